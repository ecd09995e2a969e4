fn main() {
    if let Err(e) = tablejudge_cli::logging::init_logging() {
        eprintln!("WARNING: logging disabled: {}", e);
    }
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = tablejudge_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
