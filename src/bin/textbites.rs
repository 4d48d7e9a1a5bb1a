fn main() {
    textbites::cli::run();
}
