use gravwell::Portal;

fn main() {
    if let Err(e) = Portal::new().with_title("gravwell").run() {
        eprintln!("gravwell: {e}");
        std::process::exit(1);
    }
}
