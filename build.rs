fn main() {
    // Only the firmware build needs the ESP-IDF environment; host builds
    // (tests, fuzzing) run with `--no-default-features`.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
