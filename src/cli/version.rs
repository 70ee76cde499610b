/// Display version information
pub fn execute() {
    println!("secret-santa {}", env!("CARGO_PKG_VERSION"));
    println!("Gift exchange assignment engine");
}
