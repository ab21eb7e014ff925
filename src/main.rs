fn main() {
    if let Err(error) = geocmp::run(std::env::args_os()) {
        eprintln!("{}: {error:#}", geocmp::messages::FATAL_ERROR);
        std::process::exit(2);
    }
}
