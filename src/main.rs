fn main() {
    std::process::exit(utra_analysis_lib::run());
}
