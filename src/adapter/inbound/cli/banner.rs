//! ASCII banner for interactive `run`.

use std::io::IsTerminal;

const TITLE: &str = "\x1b[1;38;2;120;200;160m";
const SUBTITLE: &str = "\x1b[38;2;100;100;120m";
const RESET: &str = "\x1b[0m";

/// Prints the banner to stdout.
///
/// Renders ANSI true-color when stdout is a terminal, plain text otherwise.
pub fn print_banner() {
    let (tt, st, r) = if std::io::stdout().is_terminal() {
        (TITLE, SUBTITLE, RESET)
    } else {
        ("", "", "")
    };

    println!(
        r#"
{tt}    __ _ _ __| |__ | |__  _   _ _ __ | |_ ___ _ __{r}
{tt}   / _` | '__| '_ \| '_ \| | | | '_ \| __/ _ \ '__|{r}
{tt}  | (_| | |  | |_) | | | | |_| | | | | ||  __/ |{r}
{tt}   \__,_|_|  |_.__/|_| |_|\__,_|_| |_|\__\___|_|{r}

{st}   cross-exchange and triangular spot arbitrage, v{version}{r}
"#,
        version = env!("CARGO_PKG_VERSION"),
    );
}
