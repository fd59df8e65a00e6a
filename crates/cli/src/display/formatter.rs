use seo_projector_core::{ProjectorConfig, RegistrationReport, host::ExecutionError};

pub fn print_registration_report(
    report: &RegistrationReport,
    config: &ProjectorConfig,
    kind_count: usize,
) {
    println!("📦 Found {} subject kinds", kind_count);
    println!("🧩 Object types: {}", report.object_types.join(", "));
    println!("🔗 Settings field: {}", report.root_field);

    println!();
    println!("✅ '{}' registered on {} types", config.field_name, report.registered.len());
    for owner in &report.registered {
        println!("   • {}.{}", owner, config.field_name);
    }

    if !report.skipped.is_empty() {
        println!();
        println!("⏭️  Skipped {} kinds without a GraphQL name", report.skipped.len());
        for kind in &report.skipped {
            println!("   • {}", kind);
        }
    }

    if !config.exclude_fields.is_empty() {
        println!();
        println!("🚫 Excluded fields: {}", config.exclude_fields.join(", "));
    }
}

/// Field errors go to stderr so stdout stays valid JSON
pub fn print_execution_errors(errors: &[ExecutionError]) {
    for error in errors {
        eprintln!("⚠️  {}: {}", error.path.join("."), error.message);
    }
}
