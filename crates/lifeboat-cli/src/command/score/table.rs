//! Ranked passenger table display

use lifeboat_analysis::scorer::ScoredPassenger;

use crate::util;

fn print_score_table_header() {
    println!(
        "  {:>6} {:>8} {:<8} {:<8} {:>6} {:<8} {:>8} {:>8} {:>8} {:>8} {:>10}",
        "Rank",
        "Id",
        "Class",
        "Sex",
        "Age",
        "Group",
        "Survived",
        "Class%",
        "Sex%",
        "Age%",
        "Advantage",
    );
    // rank(6) + id(8) + class(8) + sex(8) + age(6) + group(8) + survived(8) + rates(8 * 3) + advantage(10) + spaces(10)
    println!("  {}", "-".repeat(96));
}

fn print_score_table_row(p: &ScoredPassenger) {
    println!(
        "  {:>6} {:>8} {:<8} {:<8} {:>6.1} {:<8} {:>8} {:>8} {:>8} {:>8} {:>+10.3}",
        p.advantage_rank,
        p.passenger_id,
        p.class_name,
        p.sex,
        p.age,
        p.age_group.to_string(),
        if p.survived == 1 { "yes" } else { "no" },
        util::percent(p.class_survival_rate),
        util::percent(p.sex_survival_rate),
        util::percent(p.age_survival_rate),
        p.survival_advantage,
    );
}

/// Print scored passengers in the given order
pub(super) fn print_score_table(passengers: &[&ScoredPassenger]) {
    print_score_table_header();
    for p in passengers {
        print_score_table_row(p);
    }
}

/// Print legend explaining table columns
pub(super) fn print_legend() {
    println!("Legend:");
    println!("  Class% / Sex% / Age%  : Survival rate of the passenger's class, sex and age group");
    println!("  Advantage             : Sum of (survived - rate) over the three groups, in [-3, 3]");
    println!("  Rank                  : 1 = least expected survival, ties share a rank");
}
