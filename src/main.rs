fn main() {
    if let Err(err) = archdiagram_renderer::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
