use std::process;

fn main() {
    if let Err(err) = dominion::app::run() {
        eprintln!("fatal: {err}");
        process::exit(1);
    }
}
