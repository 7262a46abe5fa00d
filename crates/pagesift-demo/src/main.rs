fn main() {
    if let Err(e) = pagesift_demo::cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
