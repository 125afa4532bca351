use exprwhizz::{Dictionary, Parser};

fn main() {
    pretty_env_logger::init();

    let expression = "price * qty - discount";
    let tree = Parser::parse_expression(expression).expect("Failed to parse");

    let orders = [(120.0, 3.0, 15.0), (80.0, 10.0, 0.0)];

    for (i, (price, qty, discount)) in orders.into_iter().enumerate() {
        let mut variables = Dictionary::new();
        variables.store("price", price);
        variables.store("qty", qty);
        variables.store("discount", discount);

        match tree.evaluate(&mut variables) {
            Ok(result) => println!("Result {}: {}", i, result),
            Err(err) => println!("Error: {}", err),
        }
    }
}
