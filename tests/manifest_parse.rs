use watchrun::build::{parse_manifest, ManifestEntry};

#[test]
fn first_token_per_line_in_order() {
    let contents = "modA v1.0 abc123\nmodB v2.0 def456\n\n";
    let entries: Vec<ManifestEntry> = parse_manifest(contents).collect();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].module, "modA");
    assert_eq!(entries[1].module, "modB");
}

#[test]
fn whitespace_only_lines_are_skipped() {
    let entries: Vec<ManifestEntry> = parse_manifest("   \n\t\nmodC h1:xyz\n").collect();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].module, "modC");
}

#[test]
fn single_token_lines_still_parse() {
    let entries: Vec<ManifestEntry> = parse_manifest("lonely").collect();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].module, "lonely");
}

#[test]
fn empty_input_yields_nothing() {
    assert_eq!(parse_manifest("").count(), 0);
}
