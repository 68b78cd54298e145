fn main() {
    std::process::exit(rlox::cli::run());
}
