//! Migrations are embedded with `sqlx::migrate!`; recompile when they change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
