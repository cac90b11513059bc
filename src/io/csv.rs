/*!
# Saving Chains and Series to CSV

Enable via the `csv` feature.
*/

use std::error::Error;
use std::fs::File;

use csv::Writer;

/**
Saves a chain as a CSV file with header `sample,value`.

Each row holds the index of a state and the state itself.

# Examples

```rust
use mini_mc::io::csv::save_csv;

let chain = [0.0, 0.25, 0.25, -0.5];
save_csv(&chain, "/tmp/chain.csv").expect("Expecting saving data to succeed");
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_csv<T: std::fmt::Display>(chain: &[T], filename: &str) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(filename)?);
    wtr.write_record(["sample", "value"])?;

    for (sample_idx, value) in chain.iter().enumerate() {
        wtr.write_record([sample_idx.to_string(), value.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}

/**
Saves `(x, y)` pairs as a CSV file with the given column names.

# Examples

```rust
use mini_mc::io::csv::save_csv_pairs;

let errors = [(1.0, 0.3), (2.0, -0.1)];
save_csv_pairs(&errors, ("n", "error"), "/tmp/errors.csv")?;
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/
pub fn save_csv_pairs(
    pairs: &[(f64, f64)],
    header: (&str, &str),
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(filename)?);
    wtr.write_record([header.0, header.1])?;

    for (x, y) in pairs {
        wtr.write_record([x.to_string(), y.to_string()])?;
    }

    wtr.flush()?;
    Ok(())
}
