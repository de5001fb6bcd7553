use {
    anyhow::Result,
    pagebot_commands::{CommandRegistry, HandlerCatalog},
    pagebot_config::PagebotConfig,
};

/// Print the commands the gateway would register, plus any descriptors
/// that would be skipped.
pub fn list_commands(config: &PagebotConfig) -> Result<()> {
    let catalog = HandlerCatalog::builtin(&config.backends, config.routing.max_message_len)?;
    let (registry, errors) = CommandRegistry::load(&config.commands, &catalog);

    if registry.is_empty() {
        println!("No commands registered.");
    }
    for command in registry.list() {
        let marker = if command.required_role().is_restricted() {
            " [admin]"
        } else {
            ""
        };
        println!("  {}{marker} - {}", command.name(), command.description());
        if let Some(usage) = command.usage() {
            println!("      usage: {usage}");
        }
    }

    let routing = &config.routing;
    println!();
    println!("fallback: {}", routing.fallback_command);
    println!(
        "image:    {} ({:?})",
        routing.image_command, routing.image_policy
    );

    if !errors.is_empty() {
        eprintln!();
        for e in &errors {
            eprintln!("  skipped: {e}");
        }
    }
    Ok(())
}
