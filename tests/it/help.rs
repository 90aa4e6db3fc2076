use expect_test::expect;
use optswitch::{OptionParser, Settings};

#[test]
fn returns_the_help_documentation() {
    let parser = OptionParser::with(|opts| {
        opts.set_banner("This is my test parser");
        opts.on(["-d", "--debug [level]", "enable debug mode"])?;
        opts.on(["-i", "--interactive", "enable interactive mode"])?;
        Ok(())
    })
    .unwrap();

    let expected = "\
This is my test parser
    -d, --debug [level]              enable debug mode
    -i, --interactive                enable interactive mode
";
    assert_eq!(parser.help(), expected);
    assert_eq!(parser.to_string(), expected);
    assert_eq!(parser.help(), parser.help());
}

#[test]
fn registration_order_survives_parsing() {
    let mut parser = OptionParser::new();
    parser.on(["-b", "--beta", "second letter"]).unwrap();
    parser.parse_args(&["-b", "x"]).unwrap();
    parser.on(["-a", "--alpha", "first letter"]).unwrap();
    parser.parse_args(&["--alpha"]).unwrap();
    let expected = "    -b, --beta                       second letter
    -a, --alpha                      first letter
";
    assert_eq!(parser.help(), expected);
}

#[test]
fn layout() {
    let mut parser = OptionParser::new();
    parser.set_banner("Usage: demo [options]").separator("").separator("Specific options:");
    parser.on(["--[no-]verbose", "run verbosely"]).unwrap();
    parser.on(["-o", "--output=FILE", "write to FILE", "defaults to stdout"]).unwrap();
    parser
        .on(["-c", "--configuration-directory [DIRECTORY]", "read config from DIRECTORY"])
        .unwrap();
    parser.on(["-q"]).unwrap();
    expect![[r#"
        Usage: demo [options]

        Specific options:
                --[no-]verbose               run verbosely
            -o, --output=FILE                write to FILE
                                             defaults to stdout
            -c, --configuration-directory [DIRECTORY]
                                             read config from DIRECTORY
            -q
    "#]]
    .assert_eq(&parser.help());
}

#[test]
fn custom_settings() {
    let settings =
        Settings { summary_width: 20, summary_indent: "  ".to_string(), ..Settings::default() };
    let mut parser = OptionParser::with_settings(settings);
    parser.on(["-d", "--debug [level]", "enable debug mode"]).unwrap();
    assert_eq!(parser.help(), "  -d, --debug [level]  enable debug mode\n");

    parser.settings_mut().summary_width = 10;
    assert_eq!(parser.settings().summary_width, 10);
    assert_eq!(parser.help(), "  -d, --debug [level]\n             enable debug mode\n");
}

#[test]
fn short_only_placeholder() {
    let mut parser = OptionParser::new();
    parser.on(["-d [level]", "enable debug mode"]).unwrap();
    parser.on(["-jN", "run N jobs"]).unwrap();
    assert_eq!(parser.banner(), None);
    let expected = "    -d [level]                       enable debug mode
    -jN                              run N jobs
";
    assert_eq!(parser.help(), expected);
}
