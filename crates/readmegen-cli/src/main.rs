fn main() -> std::process::ExitCode {
    readmegen_cli::run()
}
