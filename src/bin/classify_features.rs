use anyhow::Result;
use std::env;

use product_advisor::locale::Locale;
use product_advisor::processor::{
    ClassificationTree, classify_feature, format_label, group_title, subgroup_title, tokenize,
};

// Usage: classify_features [--lang en|tr] [--json] <feature_id>...
fn main() -> Result<()> {
    let mut locale = Locale::default();
    let mut json = false;
    let mut features = Vec::new();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lang" => {
                if let Some(code) = args.next() {
                    locale = Locale::parse(&code).unwrap_or(locale);
                }
            }
            "--json" => json = true,
            _ => features.push(arg),
        }
    }

    if features.is_empty() {
        eprintln!("Usage: classify_features [--lang en|tr] [--json] <feature_id>...");
        return Ok(());
    }

    let tree = ClassificationTree::build(&features, locale);

    if json {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    println!("=== FEATURE CLASSIFICATION ({}) ===\n", locale);

    for feature in &features {
        let classification = classify_feature(feature);
        println!("{}", feature);
        println!("   tokens:   {:?}", tokenize(feature));
        println!(
            "   group:    {} ({})",
            classification.group,
            group_title(locale, &classification.group)
        );
        println!(
            "   subgroup: {} ({})",
            classification.subgroup,
            subgroup_title(locale, classification.subgroup)
        );
        println!("   label:    {}", format_label(locale, &classification.group, feature));
    }

    println!("\n=== ORDERED TREE ===\n");
    for group in &tree.groups {
        println!("{}", group_title(locale, &group.key));
        for subgroup in &group.subgroups {
            println!("   {}", subgroup_title(locale, subgroup.key));
            for feature in &subgroup.features {
                println!("      {}", format_label(locale, &group.key, feature));
            }
        }
    }

    Ok(())
}
