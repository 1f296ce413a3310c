use std::cell::RefCell;

use scanopt::{OptionRegistry, OptionSpec};

fn main() {
    let sources: RefCell<Vec<String>> = RefCell::new(Vec::default());
    let mut libraries: Vec<String> = Vec::default();
    let mut defines: Vec<String> = Vec::default();
    let mut optimize = false;

    OptionRegistry::new()
        .add(OptionSpec::global(|arguments| {
            sources.borrow_mut().extend_from_slice(arguments);
            Ok(())
        }))
        .add(OptionSpec::new("-libs %*").callback(|arguments| {
            libraries.extend_from_slice(arguments);
            Ok(())
        }))
        .add(OptionSpec::new("-D %*").callback(|arguments| {
            match arguments.iter().find(|define| !define.contains('=')) {
                Some(define) => Err(format!("define '{define}' must be of the form NAME=VALUE")),
                None => {
                    defines.extend_from_slice(arguments);
                    Ok(())
                }
            }
        }))
        .add(OptionSpec::flag("-O", &mut optimize))
        .build()
        .parse();

    println!("Sources: {:?}", sources.into_inner());
    println!("Libraries: {libraries:?}");
    println!("Defines: {defines:?}");
    println!("Optimize: {optimize}");
}
