extern crate sable_engine;

use sable_engine::engine::Engine;

fn main() {
    let mut engine = Engine::init(true);
    engine.uci();
}
