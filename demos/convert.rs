use scanopt::{OptionRegistry, OptionSpec};

fn main() {
    let mut quality: i32 = 90;
    let mut scale: f32 = 1.0;
    let mut output = String::default();
    let mut filters = String::default();
    let mut verbose = false;
    let mut inputs: Vec<String> = Vec::default();

    let summary = OptionRegistry::new()
        .add(OptionSpec::new("-quality %d").bind(&mut quality))
        .add(OptionSpec::new("-scale %f").bind(&mut scale))
        .add(OptionSpec::new("-o %s").bind(&mut output))
        .add(OptionSpec::new("-filter %L").bind(&mut filters))
        .add(OptionSpec::flag("-v", &mut verbose))
        .add(OptionSpec::global(|arguments| {
            inputs.extend_from_slice(arguments);
            Ok(())
        }))
        .build()
        .parse();

    if verbose {
        println!(
            "-quality matched {} time(s), -filter matched {} time(s).",
            summary.times_matched("-quality"),
            summary.times_matched("-filter")
        );
    }

    println!(
        "Converting {inputs:?} into '{output}' (quality: {quality}, scale: {scale}, filters: '{filters}')."
    );
}
