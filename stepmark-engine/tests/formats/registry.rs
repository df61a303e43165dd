use stepmark_engine::FormatRegistry;

#[test]
fn test_default_formats_and_extensions() {
    let registry = FormatRegistry::with_defaults();
    assert_eq!(
        registry.list_formats(),
        vec!["asciidoc", "dita", "html", "markdown", "mdx"]
    );

    let cases = [
        ("README.md", "markdown"),
        ("page.MDX", "mdx"),
        ("index.htm", "html"),
        ("guide.asc", "asciidoc"),
        ("map.ditamap", "dita"),
        ("notes.txt", "markdown"),
        ("Makefile", "markdown"),
    ];
    for (path, expected) in cases {
        assert_eq!(registry.resolve_format(path).name, expected, "{path}");
    }
}

#[test]
fn test_every_format_has_the_core_pattern_families() {
    let registry = FormatRegistry::with_defaults();
    for format in registry.list_formats() {
        let names: Vec<_> = registry
            .patterns(&format)
            .unwrap()
            .iter()
            .map(|p| p.name().to_string())
            .collect();
        for family in ["goToUrl", "checkHyperlink", "clickOnscreenText", "findOnscreenText"] {
            assert!(names.iter().any(|n| n == family), "{format} lacks {family}");
        }
    }
}
