//! End-to-end tests for the px to viewport pass.

use horizon_lattice_viewport::prelude::*;

const BASIC_CSS: &str = ".rule { font-size: 15px }";

fn process(css: &str, config: Config) -> String {
    run(css, config, None).css
}

fn process_from(css: &str, config: Config, from: &str) -> String {
    run(css, config, Some(from)).css
}

fn run(css: &str, config: Config, from: Option<&str>) -> Output {
    let options = ProcessOptions {
        from: from.map(Into::into),
    };
    Processor::new()
        .plugin(PxToViewport::new(config).unwrap())
        .process(css, &options)
        .unwrap()
}

mod basics {
    use super::*;

    #[test]
    fn test_readme_example() {
        let input = "h1 { margin: 0 0 20px; font-size: 32px; line-height: 2; letter-spacing: 1px; }";
        let output = "h1 { margin: 0 0 6.25vw; font-size: 10vw; line-height: 2; letter-spacing: 1px; }";
        assert_eq!(process(input, Config::default()), output);
    }

    #[test]
    fn test_replaces_px_with_vw() {
        assert_eq!(process(BASIC_CSS, Config::default()), ".rule { font-size: 4.6875vw }");
    }

    #[test]
    fn test_values_below_one_and_without_leading_zero() {
        let rules = ".rule { margin: 0.5rem .5px -0.2px -.2em }";
        let expected = ".rule { margin: 0.5rem 0.15625vw -0.0625vw -.2em }";
        assert_eq!(process(rules, Config::new().min_pixel_value(0.0)), expected);
    }

    #[test]
    fn test_zero_stays_unitless() {
        let css = ".rule { font-size: 0px; font-size: 0; }";
        assert_eq!(process(css, Config::default()), css);
    }

    #[test]
    fn test_existing_value_is_not_duplicated() {
        let css = ".rule { font-size: 16px; font-size: 5vw; }";
        assert_eq!(process(css, Config::default()), css);
    }

    #[test]
    fn test_media_queries_untouched_by_default() {
        let css = "@media (min-width: 500px) { .rule { font-size: 16px } }";
        assert_eq!(process(css, Config::default()), css);
    }
}

mod value_parsing {
    use super::*;

    #[test]
    fn test_quoted_values_untouched() {
        let rules = ".rule { content: '16px'; font-family: \"16px\"; font-size: 16px; }";
        let expected = ".rule { content: '16px'; font-family: \"16px\"; font-size: 5vw; }";
        assert_eq!(process(rules, Config::new().prop_list(["*"])), expected);
    }

    #[test]
    fn test_url_values_untouched() {
        let rules = ".rule { background: url(16px.jpg); font-size: 16px; }";
        let expected = ".rule { background: url(16px.jpg); font-size: 5vw; }";
        assert_eq!(process(rules, Config::default()), expected);
    }

    #[test]
    fn test_uppercase_units_untouched() {
        let rules = ".rule { margin: 12px calc(100% - 14PX); height: calc(100% - 20px); font-size: 12Px; line-height: 16px; }";
        let expected = ".rule { margin: 3.75vw calc(100% - 14PX); height: calc(100% - 6.25vw); font-size: 12Px; line-height: 5vw; }";
        assert_eq!(process(rules, Config::default()), expected);
    }
}

mod options {
    use super::*;

    #[test]
    fn test_non_px_ignored_by_default() {
        let css = ".rule { font-size: 2em }";
        assert_eq!(process(css, Config::default()), css);
    }

    #[test]
    fn test_source_unit() {
        let rules = ".rule { font-size: 5em; line-height: 2px }";
        let expected = ".rule { font-size: 1.5625vw; line-height: 2px }";
        assert_eq!(process(rules, Config::new().source_unit("em")), expected);
    }

    #[test]
    fn test_base_width() {
        assert_eq!(
            process(BASIC_CSS, Config::new().base_width(480.0)),
            ".rule { font-size: 3.125vw }"
        );
    }

    #[test]
    fn test_precision() {
        assert_eq!(
            process(BASIC_CSS, Config::new().precision(2)),
            ".rule { font-size: 4.69vw }"
        );
    }

    #[test]
    fn test_target_unit() {
        assert_eq!(
            process(".rule { margin-top: 15px }", Config::new().target_unit("vh")),
            ".rule { margin-top: 4.6875vh }"
        );
    }

    #[test]
    fn test_font_target_unit() {
        assert_eq!(
            process(
                ".rule { margin-top: 15px; font-size: 8px; }",
                Config::new().font_target_unit("vmax")
            ),
            ".rule { margin-top: 4.6875vw; font-size: 2.5vmax; }"
        );
    }

    #[test]
    fn test_min_pixel_value() {
        let rules = ".rule { border: 1px solid #000; font-size: 16px; margin: 1px 10px; }";
        let expected = ".rule { border: 1px solid #000; font-size: 5vw; margin: 1px 3.125vw; }";
        assert_eq!(process(rules, Config::new().min_pixel_value(2.0)), expected);
    }

    #[test]
    fn test_insert_mode_keeps_fallback() {
        assert_eq!(
            process(BASIC_CSS, Config::new().replace_in_place(false)),
            ".rule { font-size: 15px; font-size: 4.6875vw }"
        );
    }

    #[test]
    fn test_insert_mode_twice_adds_nothing() {
        let config = Config::new().replace_in_place(false);
        let once = process(".rule { margin: 10px 1px; width: 32px; }", config.clone());
        assert_eq!(once, ".rule { margin: 10px 1px; margin: 3.125vw 1px; width: 32px; width: 10vw; }");
        assert_eq!(process(&once, config), once);
    }
}

mod selector_blacklist {
    use super::*;

    #[test]
    fn test_blacklisted_selector() {
        let rules = ".rule { font-size: 15px } .rule2 { font-size: 15px }";
        let expected = ".rule { font-size: 4.6875vw } .rule2 { font-size: 15px }";
        assert_eq!(process(rules, Config::new().blacklist(".rule2")), expected);
    }

    #[test]
    fn test_literal_entry_is_substring() {
        let rules = "body { font-size: 16px; } .class-body$ { font-size: 16px; } .simple-class { font-size: 16px; }";
        let expected = "body { font-size: 5vw; } .class-body$ { font-size: 16px; } .simple-class { font-size: 5vw; }";
        assert_eq!(process(rules, Config::new().blacklist("body$")), expected);
    }

    #[test]
    fn test_pattern_entry_is_anchored() {
        let rules = "body { font-size: 16px; } .class-body { font-size: 16px; } .simple-class { font-size: 16px; }";
        let expected = "body { font-size: 16px; } .class-body { font-size: 5vw; } .simple-class { font-size: 5vw; }";
        let config = Config::new().blacklist(SelectorFilter::pattern("^body$").unwrap());
        assert_eq!(process(rules, config), expected);
    }
}

mod media_query {
    use super::*;

    #[test]
    fn test_converts_when_enabled() {
        assert_eq!(
            process(
                "@media (min-width: 500px) { .rule { font-size: 16px } }",
                Config::new().convert_in_media_query(true)
            ),
            "@media (min-width: 500px) { .rule { font-size: 5vw } }"
        );
    }

    #[test]
    fn test_untouched_when_disabled() {
        let css = "@media (min-width: 500px) { .rule { font-size: 16px } }";
        assert_eq!(process(css, Config::new().convert_in_media_query(false)), css);
    }

    #[test]
    fn test_declarations_in_nested_at_rules_untouched() {
        let css = ".a { @media (min-width: 500px) { width: 10px } height: 32px }";
        let expected = ".a { @media (min-width: 500px) { width: 10px } height: 10vw }";
        assert_eq!(process(css, Config::default()), expected);
        assert_eq!(process(css, Config::new().convert_in_media_query(true)), expected);
    }

    #[test]
    fn test_landscape_params_use_landscape_width() {
        let config = Config::new().convert_in_media_query(true).landscape(true);
        assert_eq!(
            process(
                "@media (orientation-landscape) and (min-width: 500px) { .rule { font-size: 16px } }",
                config
            ),
            "@media (orientation-landscape) and (min-width: 500px) { .rule { font-size: 2.8169vw } }"
        );
    }
}

mod prop_list {
    use super::*;

    const CSS: &str = ".rule { font-size: 16px; margin: 16px; margin-left: 5px; padding: 5px; padding-right: 16px }";

    #[test]
    fn test_only_listed_properties() {
        let expected = ".rule { font-size: 5vw; margin: 5vw; margin-left: 5px; padding: 5px; padding-right: 5vw }";
        let config = Config::new().prop_list(["*font*", "margin*", "!margin-left", "*-right", "pad"]);
        assert_eq!(process(CSS, config), expected);
    }

    #[test]
    fn test_wildcard_with_exclusions() {
        let expected = ".rule { font-size: 16px; margin: 5vw; margin-left: 5px; padding: 5px; padding-right: 16px }";
        let config = Config::new().prop_list(["*", "!margin-left", "!*padding*", "!font*"]);
        assert_eq!(process(CSS, config), expected);
    }

    #[test]
    fn test_default_list_converts_everything() {
        assert_eq!(
            process(".rule { margin: 16px; font-size: 15px }", Config::default()),
            ".rule { margin: 5vw; font-size: 4.6875vw }"
        );
    }

    #[test]
    fn test_empty_list_converts_everything() {
        assert_eq!(
            process(".rule { margin: 16px }", Config::new().prop_list(Vec::<String>::new())),
            ".rule { margin: 5vw }"
        );
    }
}

mod file_filters {
    use super::*;

    const RULES: &str = ".rule { border: 1px solid #000; font-size: 16px; margin: 1px 10px; }";
    const COVERED: &str = ".rule { border: 1px solid #000; font-size: 5vw; margin: 1px 3.125vw; }";

    fn single(pattern: &str) -> FileFilter {
        FileFilter::single(pattern).unwrap()
    }

    fn list(patterns: &[&str]) -> FileFilter {
        FileFilter::list(patterns).unwrap()
    }

    #[test]
    fn test_exclude_single() {
        let config = || Config::new().exclude_filter(single("/node_modules/"));
        assert_eq!(process_from(RULES, config(), "/node_modules/main.css"), RULES);
        assert_eq!(process_from(RULES, config(), "/example/main.css"), COVERED);
    }

    #[test]
    fn test_exclude_list() {
        let config = || Config::new().exclude_filter(list(&["/node_modules/", "/exclude/"]));
        assert_eq!(process_from(RULES, config(), "/exclude/main.css"), RULES);
        assert_eq!(process_from(RULES, config(), "/example/main.css"), COVERED);
    }

    #[test]
    fn test_include_single() {
        let config = || Config::new().include_filter(single("/mobile/"));
        assert_eq!(process_from(RULES, config(), "/pc/main.css"), RULES);
        assert_eq!(process_from(RULES, config(), "/mobile/main.css"), COVERED);
    }

    #[test]
    fn test_include_list() {
        let config = || Config::new().include_filter(list(&["/flexible/", "/mobile/"]));
        assert_eq!(process_from(RULES, config(), "/pc/main.css"), RULES);
        assert_eq!(process_from(RULES, config(), "/flexible/main.css"), COVERED);
    }

    #[test]
    fn test_include_and_exclude_single() {
        let config = || {
            Config::new()
                .include_filter(single("/mobile/"))
                .exclude_filter(single("/not-transform/"))
        };
        assert_eq!(process_from(RULES, config(), "/mobile/not-transform/main.css"), RULES);
        assert_eq!(process_from(RULES, config(), "/mobile/style/main.css"), COVERED);
    }

    #[test]
    fn test_include_and_exclude_lists() {
        let config = || {
            Config::new()
                .include_filter(list(&["/flexible/", "/mobile/"]))
                .exclude_filter(list(&["/not-transform/", "pc"]))
        };
        assert_eq!(process_from(RULES, config(), "/flexible/not-transform/main.css"), RULES);
        assert_eq!(process_from(RULES, config(), "/mobile/style/main.css"), COVERED);
    }

    #[test]
    fn test_unanchored_patterns() {
        let from = "/pc-project/main.css";
        assert_eq!(process_from(RULES, Config::new().exclude_filter(single("pc")), from), RULES);
        assert_eq!(process_from(RULES, Config::new().exclude_filter(single("/pc/")), from), COVERED);
        assert_eq!(process_from(RULES, Config::new().include_filter(single("/pc/")), from), RULES);
        assert_eq!(process_from(RULES, Config::new().include_filter(single("pc")), from), COVERED);
    }

    #[test]
    fn test_filters_ignored_without_source_file() {
        let config = Config::new().include_filter(single("/mobile/"));
        assert_eq!(process(RULES, config), COVERED);
    }
}

mod landscape {
    use super::*;

    const CSS: &str = ".rule { font-size: 16px; margin: 16px; margin-left: 5px; padding: 5px; padding-right: 16px }";

    #[test]
    fn test_adds_landscape_block() {
        let expected = ".rule { font-size: 5vw; margin: 5vw; margin-left: 1.5625vw; padding: 1.5625vw; padding-right: 5vw }@media (orientation: landscape) {.rule { font-size: 2.8169vw; margin: 2.8169vw; margin-left: 0.88028vw; padding: 0.88028vw; padding-right: 2.8169vw } }";
        assert_eq!(process(CSS, Config::new().landscape(true)), expected);
    }

    #[test]
    fn test_landscape_unit() {
        let expected = ".rule { font-size: 5vw; margin: 5vw; margin-left: 1.5625vw; padding: 1.5625vw; padding-right: 5vw }@media (orientation: landscape) {.rule { font-size: 2.8169vh; margin: 2.8169vh; margin-left: 0.88028vh; padding: 0.88028vh; padding-right: 2.8169vh } }";
        let config = Config::new().landscape(true).landscape_unit("vh");
        assert_eq!(process(CSS, config), expected);
    }

    #[test]
    fn test_no_landscape_copy_inside_media_queries() {
        let config = Config::new().landscape(true).convert_in_media_query(true);
        assert_eq!(
            process("@media (min-width: 500px) { .rule { font-size: 16px } }", config),
            "@media (min-width: 500px) { .rule { font-size: 5vw } }"
        );
    }

    #[test]
    fn test_insert_mode_with_landscape() {
        let config = Config::new().replace_in_place(false).landscape(true);
        assert_eq!(
            process(BASIC_CSS, config),
            ".rule { font-size: 15px; font-size: 4.6875vw }@media (orientation: landscape) {.rule { font-size: 2.64085vw } }"
        );
    }

    #[test]
    fn test_landscape_width() {
        let config = Config::new().landscape(true).landscape_width(768.0);
        assert_eq!(
            process(BASIC_CSS, config),
            ".rule { font-size: 4.6875vw }@media (orientation: landscape) {.rule { font-size: 1.95313vw } }"
        );
    }

    #[test]
    fn test_no_empty_landscape_block() {
        let css = ".rule { font-size: 15vw }";
        assert_eq!(process(css, Config::new().landscape(true)), css);
    }

    #[test]
    fn test_landscape_rules_keep_source_order() {
        let css = ".a { width: 16px } .skip { color: red } .b { height: 32px }";
        let output = run(css, Config::new().landscape(true), None);

        let media = output.root.nodes.last().and_then(Node::as_at_rule).unwrap();
        assert_eq!(media.params, "(orientation: landscape)");
        let selectors: Vec<_> = media
            .nodes
            .as_ref()
            .unwrap()
            .iter()
            .filter_map(Node::as_rule)
            .map(|rule| rule.selector.as_str())
            .collect();
        assert_eq!(selectors, [".a", ".b"]);
    }
}

mod ignore_comments {
    use super::*;

    #[test]
    fn test_same_line_ignore() {
        let css = ".rule { font-size: 15px; /* simple comment */ width: 100px; /* px-to-viewport-ignore */ height: 50px; }";
        let expected = ".rule { font-size: 4.6875vw; /* simple comment */ width: 100px; height: 15.625vw; }";
        assert_eq!(process(css, Config::default()), expected);
    }

    #[test]
    fn test_same_line_ignore_multiline() {
        let css = ".rule {\n  font-size: 15px;\n  width: 100px; /*px-to-viewport-ignore*/\n  height: 50px;\n}";
        let expected = ".rule {\n  font-size: 4.6875vw;\n  width: 100px;\n  height: 15.625vw;\n}";
        assert_eq!(process(css, Config::default()), expected);
    }

    #[test]
    fn test_ignore_next() {
        let css = ".rule {\n  font-size: 15px;\n  /*px-to-viewport-ignore-next*/\n  width: 100px;\n  /*px-to-viewport-ignore*/\n  height: 50px;\n}";
        let expected = ".rule {\n  font-size: 4.6875vw;\n  width: 100px;\n  /*px-to-viewport-ignore*/\n  height: 15.625vw;\n}";

        let output = run(css, Config::default(), None);
        assert_eq!(output.css, expected);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_misplaced_ignore_warns() {
        let css = ".rule {\n  width: 32px;\n  /* px-to-viewport-ignore */\n  height: 50px;\n}";
        let expected = ".rule {\n  width: 10vw;\n  /* px-to-viewport-ignore */\n  height: 15.625vw;\n}";

        let output = run(css, Config::default(), None);
        assert_eq!(output.css, expected);
        assert_eq!(output.warnings.len(), 1);
        assert_eq!(
            output.warnings[0].text,
            "Unexpected comment /* px-to-viewport-ignore */ must be after declaration at same line."
        );
        assert_eq!(output.warnings[0].line, 3);
    }
}
