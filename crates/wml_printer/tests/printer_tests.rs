//! Printer integration tests.

use wml_parser::parse_document;
use wml_printer::{print_document, Printer, PrinterOptions};

/// Helper: parse and print with default options.
fn print(source: &str) -> String {
    let result = parse_document("test.cfg", source);
    print_document(&result.document)
}

#[test]
fn test_print_tree() {
    let source = "[unit]\nid=elf\n{M ./x}\n#ifdef E\nhp=1\n#else\nhp=2\n#endif\n[/unit]\n";
    let expected = "\
Tag [unit] 0..61
  Key id 7..14
    Value \"elf\" 10..13
  MacroCall {M} 14..21
    Value \"./\" 17..19
    Value \"x\" 19..20
  PreprocIf #ifdef E 22..54
    Key hp 31..36
      Value \"1\" 34..35
  Else 36..42
    Key hp 42..47
      Value \"2\" 45..46
";
    assert_eq!(print(source), expected);
}

#[test]
fn test_print_flags_and_labels() {
    assert_eq!(print("[a][/b]"), "Tag [a] [/b] 0..7 (mismatched_close)\n");
    assert_eq!(
        print("#define M X\n<<code>>\n#enddef\n"),
        "MacroDefine M X 0..29\n  LuaCode \"code\" 12..20\n"
    );
}

#[test]
fn test_print_without_ranges() {
    let result = parse_document("test.cfg", "#textdomain wesnoth\n[+a]\nk=[x]\n[/a]\n");
    let options = PrinterOptions {
        ranges: false,
        ..PrinterOptions::default()
    };
    let output = Printer::with_options(options).print(&result.document);
    assert_eq!(
        output,
        "Textdomain wesnoth\nTag [+a]\n  Key k\n    ArrayCall\n      Value \"x\"\n"
    );
}

#[test]
fn test_print_is_deterministic() {
    let source = "[a]\nb={C ~d/e} <<f>>\n[/a]\n";
    assert_eq!(print(source), print(source));
}
