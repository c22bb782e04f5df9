use waypost::{Actor, RuleSetBuilder, Trigger};

fn main() {
    // Specific-before-general pattern using weights.
    // Lower weights are considered first; ties break on rule id.
    let ruleset = RuleSetBuilder::new()
        .rule("admins", |r| {
            r.on(Trigger::Login).role("admin").weight(-10).to("/admin/overview")
        })
        .rule("editors", |r| {
            r.on(Trigger::Login).role("editor").weight(-5).to("/dashboard")
        })
        .rule("everyone", |r| r.on(Trigger::Login).weight(10).to("/welcome"))
        .compile()
        .expect("failed to compile ruleset");

    // Admin who is also an editor: the lighter admin rule wins
    let admin = Actor::new().with_roles(["admin", "editor"]);
    match ruleset.resolve(Trigger::Login, &admin, "/user/login") {
        Some(redirect) => println!("Admin: {redirect}"),
        None => println!("Admin: no match"),
    }

    // Editor: falls past the admin rule to the editor rule
    let editor = Actor::new().with_role("editor");
    match ruleset.resolve(Trigger::Login, &editor, "/user/login") {
        Some(redirect) => println!("Editor: {redirect}"),
        None => println!("Editor: no match"),
    }

    // Anonymous visitor: only the catch-all applies
    let visitor = Actor::new();
    match ruleset.resolve(Trigger::Login, &visitor, "/user/login") {
        Some(redirect) => println!("Visitor: {redirect}"),
        None => println!("Visitor: no match"),
    }
}
