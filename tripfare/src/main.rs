use clap::Parser;
use tripfare::app::{AppError, TripfareApp};

fn main() -> Result<(), AppError> {
    env_logger::init();
    let args = TripfareApp::parse();
    args.op.run()
}
