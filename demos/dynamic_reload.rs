// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamic reload example for the mdmcfg crate.
//!
//! Follows a payload file and prints a value every second. Edit the file while the
//! example runs to watch new snapshots being published.
//!
//! To run this example:
//! ```bash
//! cargo run --example dynamic_reload --features reload -- /path/to/managed.yaml
//! ```

use mdmcfg::prelude::*;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "managed.yaml".to_string());

    let store = SharedStore::new("mdm");
    let _watcher = store.follow_file(&path)?;
    let config = ConfigAccessor::new(store.clone());

    println!("Following {} (Ctrl-C to quit)", path);
    for _ in 0..60 {
        println!(
            "version {}: CheckInterval = {}",
            store.version(),
            config.unsigned_int_for("CheckInterval")
        );
        thread::sleep(Duration::from_secs(1));
    }

    Ok(())
}
