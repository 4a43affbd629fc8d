use rask_logger::app;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    app::main()
}
