fn main() {
    std::process::exit(msbasic::term::main());
}
