pub mod ledger;
pub mod record;
pub mod search;
pub mod system;

use crate::cli::registry::CommandRegistry;

/// Registers every command, in the order the menu lists them.
pub(crate) fn register_all(registry: &mut CommandRegistry) {
    let definitions = record::definitions()
        .into_iter()
        .chain(ledger::definitions())
        .chain(search::definitions())
        .chain(system::definitions());
    for entry in definitions {
        registry.register(entry);
    }
}
