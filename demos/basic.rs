use waypost::{Actor, RuleSetBuilder, Trigger};

fn main() {
    // Define rules
    let ruleset = RuleSetBuilder::new()
        .rule("editors", |r| {
            r.on(Trigger::Login).role("editor").weight(-5).to("/dashboard")
        })
        .rule("everyone", |r| r.on(Trigger::Login).to("/welcome"))
        .compile()
        .expect("failed to compile ruleset");

    println!("{ruleset}");

    // Resolve a login event
    let actor = Actor::new().with_role("editor").with_language("en");

    match ruleset.resolve(Trigger::Login, &actor, "/user/login") {
        Some(redirect) => println!("Result: {redirect}"),
        None => println!("No rule matched."),
    }
}
