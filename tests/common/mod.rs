#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use watchrun::config::BuildTool;

/// Write an executable shell script and return its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = fs::File::create(&path).expect("create script");
    writeln!(file, "#!/bin/sh").expect("write shebang");
    writeln!(file, "{body}").expect("write body");
    drop(file);

    let mut perms = fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("chmod script");
    path
}

/// Replace a script's body, keeping its permissions.
pub fn rewrite_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}\n")).expect("rewrite script");
}

/// Build tool description pointing at a scripted build command.
pub fn scripted_tool(script: &Path, output: &Path, manifest: &Path) -> BuildTool {
    BuildTool {
        command: vec![script.to_string_lossy().into_owned()],
        output: output.to_path_buf(),
        manifest: manifest.to_path_buf(),
        module_root_env: "WATCHRUN_TEST_MODULE_ROOT".to_string(),
    }
}
