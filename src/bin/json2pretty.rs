use std::error::Error;
use std::fs;
use std::io::{self, Read};

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();

    let text = match args.get(1).map(|s| s.as_str()) {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read_to_string(path)?,
    };

    let value = chutney::parse(&text)?;
    println!("{}", value);
    Ok(())
}
