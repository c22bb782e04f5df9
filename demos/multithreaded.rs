use std::sync::Arc;
use std::thread;

use waypost::{Actor, RuleSetBuilder, Trigger};

fn main() {
    let ruleset = Arc::new(
        RuleSetBuilder::new()
            .rule("editors", |r| {
                r.on(Trigger::Login).role("editor").weight(-5).to("/dashboard")
            })
            .rule("everyone", |r| r.on(Trigger::Login).to("/welcome"))
            .compile()
            .expect("failed to compile ruleset"),
    );

    let roles = ["editor", "authenticated", "editor", "moderator"];

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let rs = Arc::clone(&ruleset);
            thread::spawn(move || {
                let actor = Actor::new().with_role(roles[i]);
                let result = rs.resolve(Trigger::Login, &actor, "/user/login");
                println!("Thread {i}: {result:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
