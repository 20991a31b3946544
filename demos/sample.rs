//! Prints the sample functions' results.
//!
//! ```bash
//! cargo run --example sample
//! ```

use ollama_dev::sample::{DataProcessor, fibonacci, fibonacci_memo};
use serde_json::json;

fn main() {
    let mut processor = DataProcessor::new(vec![json!(1), json!(2), json!(3), json!(4), json!(5)]);

    if let (Some(naive), Some(memo)) = (fibonacci(10), fibonacci_memo(10)) {
        println!("Recursive Fibonacci of 10: {naive}");
        println!("Memoized Fibonacci of 10: {memo}");
    }

    match processor.validate() {
        Ok(true) => println!("Processed data: {} elements", processor.process()),
        Ok(false) => println!("Data contains non-numeric values"),
        Err(e) => println!("Validation failed: {e}"),
    }
}
