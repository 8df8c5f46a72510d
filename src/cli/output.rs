//! Output formatting for CLI

use crate::models::{Model, ObjectType, Property};

/// Format a mapped model as a readable summary
pub fn format_summary(model: &Model) -> String {
    let mut output = String::new();

    match model.alias() {
        Some(alias) => output.push_str(&format!("Model '{}'\n", alias)),
        None => output.push_str("Model\n"),
    }
    output.push_str(&format!("Object types: {}\n", model.len()));

    for object_type in model.object_types() {
        output.push_str(&format_object_type(object_type));
    }

    output
}

fn format_object_type(object_type: &ObjectType) -> String {
    let mut output = format!("\n{}", object_type.name);
    if !object_type.supertypes.is_empty() {
        output.push_str(&format!(" : {}", object_type.supertypes.join(", ")));
    }
    output.push('\n');

    for property in object_type.properties() {
        let key = if property.is_identifier() { " [id]" } else { "" };
        let line = match property {
            Property::Attribute(attribute) => format!(
                "  {}: {} ({}){}\n",
                attribute.name, attribute.value_type, attribute.cardinality, key
            ),
            Property::Relation(relation) => {
                let inverse = relation
                    .inverse_name
                    .as_ref()
                    .map(|name| format!(" <- {}", name))
                    .unwrap_or_default();
                format!(
                    "  {} -> {} ({}){}{}\n",
                    relation.name, relation.target, relation.cardinality, inverse, key
                )
            }
        };
        output.push_str(&line);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, Cardinality, Relation, ValueType};

    #[test]
    fn test_format_summary() {
        let fiets = ObjectType::builder("Fiets")
            .supertype("Product")
            .property(
                Attribute::new("framenummer", ValueType::String, Cardinality::Required)
                    .with_identifier(true),
            )
            .property(
                Relation::new("merk", "Merk", Cardinality::Optional)
                    .with_inverse(Some("fietsen".to_string()), Cardinality::Multi),
            )
            .build()
            .unwrap();
        let model = Model::builder().alias("winkel").object_type(fiets).build().unwrap();

        let summary = format_summary(&model);
        assert!(summary.starts_with("Model 'winkel'\nObject types: 1\n"));
        assert!(summary.contains("Fiets : Product\n"));
        assert!(summary.contains("  framenummer: String (1) [id]\n"));
        assert!(summary.contains("  merk -> Merk (0..1) <- fietsen\n"));
    }
}
