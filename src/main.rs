use colored::Colorize;

fn main() {
    if let Err(err) = react_kickstart::cli::run() {
        eprintln!("{}", format!("{err:#}").red().bold());
        std::process::exit(1);
    }
}
