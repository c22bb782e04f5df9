use waypost::{Actor, RuleSetBuilder, Trigger};

fn main() {
    let ruleset = RuleSetBuilder::new()
        .rule("admins", |r| {
            r.on(Trigger::Login).role("admin").weight(-10).to("/admin/overview")
        })
        .rule("editors", |r| {
            r.on(Trigger::Login).role("editor").weight(-5).to("/dashboard")
        })
        .rule("german_users", |r| {
            r.on(Trigger::Login).language("de").to("/de/willkommen")
        })
        .rule("everyone", |r| r.on(Trigger::Login).weight(10).to("/welcome"))
        .compile()
        .expect("failed to compile ruleset");

    let actor = Actor::new().with_role("editor").with_language("en");
    let report = ruleset.resolve_detailed(Trigger::Login, &actor, "/user/login");

    println!("{report}");
    println!();
    for (rule_id, outcome) in report.outcomes() {
        println!("{rule_id:>16}: {outcome}");
    }
    println!();
    println!("Duration: {:?}", report.duration());
}
