use exprwhizz::{tokenize, Dictionary, Parser};
use log::debug;

fn main() {
    pretty_env_logger::init();

    let expr = "2 ^ (1.5 * 2) / (-1.7 + (6 - 0.3))";

    let mut tokens = tokenize(expr).unwrap();
    for token in tokens.iter() {
        debug!("token: {token}");
    }

    let tree = Parser::parse(&mut tokens).unwrap();
    debug!("tree: {tree:?}");
    println!("count: {}, depth: {}", tree.count(), tree.depth());

    let mut variables = Dictionary::new();
    match tree.evaluate(&mut variables) {
        Ok(value) => println!("{} ==> {}", tree, value),
        Err(err) => println!("Error: {}", err),
    }
}
