use exprwhizz::Evaluator;

fn main() {
    pretty_env_logger::init();

    let lines = [
        "r = 2.5",
        "pi = 3.14159",
        "area = pi * r ^ 2",
        "area / 2",
        "count = 0x10",
        "16--*2",
        "3 + 2)",
        "radius",
        "1 / 0",
    ];

    let mut evaluator = Evaluator::new(100);
    for line in lines {
        match evaluator.evaluate_expression(line) {
            Ok(evaluation) => println!("{evaluation}"),
            Err(err) => eprintln!("{err}"),
        }
    }

    println!("variables:");
    evaluator
        .variables()
        .for_each(|name, value| println!("  {name} = {value}"));
}
