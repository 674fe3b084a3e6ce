use crate::cli::ListArgs;
use crate::commands::{CommandResult, exit_code};
use postrs::PostCollection;

pub fn run(args: ListArgs) -> i32 {
    exit_code(list(args))
}

fn list(args: ListArgs) -> CommandResult {
    let collection =
        PostCollection::from_path(&args.collection, None).map_err(|e| e.to_string())?;

    let lines = collection.help();
    if lines.is_empty() {
        println!("No requests found in collection {}", args.collection.display());
    } else {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}
