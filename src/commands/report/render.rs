use super::queries::{AlignmentAverages, AppearanceSummary, PowerIndex};

pub(crate) fn disney_summary(summary: &AppearanceSummary, top_n: usize) -> String {
    let mut out = String::new();

    out.push_str("character media appearance statistics\n");
    out.push_str("--------------------------------------\n\n");
    out.push_str(&format!(
        "total characters analyzed: {}\n",
        summary.total_characters
    ));
    out.push_str(&format!(
        "average number of media appearances: {:.2}\n\n",
        summary.mean_appearances
    ));
    out.push_str(&format!("top {top_n} characters by media appearances:\n"));

    for row in &summary.top {
        let name = row.name.as_deref().unwrap_or("(unnamed)");
        out.push_str(&format!("- {}: {} appearances\n", name, row.appearances));
    }

    out
}

pub(crate) fn hero_summary(
    power: &[PowerIndex],
    averages: &[AlignmentAverages],
    top_n: usize,
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Top {top_n} Heroes by Power Index\n"));
    out.push_str("----------------------------------------\n");
    for row in power {
        let name = row.name.as_deref().unwrap_or("(unnamed)");
        out.push_str(&format!(
            "{:>4}  {:<25}  power_index = {:.2}\n",
            row.hero_id, name, row.power_index
        ));
    }

    out.push_str("\n\nAverage Powerstats by Alignment\n");
    out.push_str("----------------------------------------\n");
    for group in averages {
        out.push_str(&format!("\nAlignment: {}\n", group.alignment));
        let stats = [
            ("intelligence", group.intelligence),
            ("strength", group.strength),
            ("speed", group.speed),
            ("durability", group.durability),
            ("power", group.power),
            ("combat", group.combat),
        ];
        for (stat_name, value) in stats {
            match value {
                Some(value) => out.push_str(&format!("  {stat_name:<12}: {value:.2}\n")),
                None => out.push_str(&format!("  {stat_name:<12}: None\n")),
            }
        }
    }

    out
}
