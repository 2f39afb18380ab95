use tabled::{settings::Style, Table, Tabled};

const RULE_WIDTH: usize = 50;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Print a framed stage header, preceded by a blank line.
pub fn print_section(title: &str) {
    println!("\n{}", rule());
    println!("{}", title);
    println!("{}", rule());
}

pub fn print_table<T>(rows: &[T])
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        println!("(no rows)");
        return;
    }
    println!("{}", render_table(rows));
}

pub fn render_table<T>(rows: &[T]) -> String
where
    T: Tabled + Clone,
{
    Table::new(rows.to_vec()).with(Style::markdown()).to_string()
}
