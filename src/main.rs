use minish::Shell;

fn main() {
    let shell = Shell::default();
    if let Err(e) = shell.repl() {
        eprintln!("minish: {e}");
        std::process::exit(1);
    }
}
