fn main() -> eframe::Result<()> {
    firefly::run()
}
