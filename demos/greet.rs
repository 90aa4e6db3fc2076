use std::collections::BTreeMap;

use optswitch::{OptionParser, Value};

fn main() {
    let mut show_help = false;
    let mut matches = BTreeMap::new();
    let mut args = std::env::args().skip(1).collect::<Vec<_>>();

    let help = {
        let mut parser = OptionParser::with(|opts| {
            opts.set_banner("Usage: greet [options] NAME...");
            opts.on(["-e", "--emoji", "end with a heart instead of a bang"])?;
            opts.on(["-g", "--greeting WORD", "use WORD instead of `Hello`"])?;
            Ok(())
        })
        .unwrap_or_else(|err| err.exit());
        parser
            .on_with(["-h", "--help", "print this help"], |_| show_help = true)
            .unwrap_or_else(|err| err.exit());
        parser.parse_into(&mut args, &mut matches).unwrap_or_else(|err| err.exit());
        parser.help()
    };

    if show_help {
        print!("{help}");
        return;
    }

    let greeting = matches.get("greeting").and_then(Value::as_str).unwrap_or("Hello");
    let bang = if matches.contains_key("emoji") { "❣️" } else { "!" };
    for name in &args {
        println!("{greeting} {name}{bang}");
    }
}
