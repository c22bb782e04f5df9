use waypost::{Actor, RuleSet, Trigger};

fn main() {
    let ruleset = RuleSet::from_file("demos/rules.waypost").expect("failed to load rules");

    println!("{ruleset}");

    let actor = Actor::new().with_role("editor").with_language("en");

    match ruleset.resolve(Trigger::Login, &actor, "/user/login") {
        Some(redirect) => println!("Redirect: {redirect}"),
        None => println!("No rule matched."),
    }
}
