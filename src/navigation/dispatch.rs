/// Icon and action resolution per command type
///
/// Each `CommandType` gets one resolver, registered once in a `DispatchTable`.
/// Registry commands look up the registry; entity commands turn into
/// navigation requests for the host.

use crate::core::command::{Command, CommandType};
use crate::core::registry::{Action, CommandRegistry, Icon};
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

/// Where the host should go when an entity row is activated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Open (or focus) a session on this note
    OpenNote(String),
    Notebook(String),
    Tag(String),
    /// Reminder edit view
    EditReminder(String),
}

/// Host side of entity activation
pub trait Navigator: Send + Sync {
    fn navigate(&self, request: NavigationRequest);
}

/// Capability lookup for one command type
pub trait ActionResolver: Send + Sync {
    fn resolve_icon(&self, id: &str) -> Option<Icon>;
    fn resolve_action(&self, id: &str) -> Option<Action>;
}

struct RegistryResolver {
    registry: Arc<CommandRegistry>,
}

impl ActionResolver for RegistryResolver {
    fn resolve_icon(&self, id: &str) -> Option<Icon> {
        self.registry.icon(id)
    }

    fn resolve_action(&self, id: &str) -> Option<Action> {
        self.registry.action(id)
    }
}

/// Entity types: fixed icon, action builds a navigation request from the id
struct EntityResolver {
    navigator: Arc<dyn Navigator>,
    request: fn(String) -> NavigationRequest,
    icon: Icon,
}

impl ActionResolver for EntityResolver {
    fn resolve_icon(&self, _id: &str) -> Option<Icon> {
        Some(self.icon.clone())
    }

    fn resolve_action(&self, _id: &str) -> Option<Action> {
        let navigator = Arc::clone(&self.navigator);
        let request = self.request;
        Some(Arc::new(move |id: &str| navigator.navigate(request(id.to_string()))))
    }
}

/// Resolver per command type, built once
pub struct DispatchTable {
    resolvers: HashMap<CommandType, Box<dyn ActionResolver>>,
}

impl DispatchTable {
    pub fn new(registry: Arc<CommandRegistry>, navigator: Arc<dyn Navigator>) -> Self {
        let mut resolvers: HashMap<CommandType, Box<dyn ActionResolver>> = HashMap::new();

        for kind in CommandType::ALL {
            let resolver: Box<dyn ActionResolver> = match kind {
                CommandType::StaticCommand | CommandType::DynamicCommand => {
                    Box::new(RegistryResolver {
                        registry: Arc::clone(&registry),
                    })
                }
                CommandType::Note => entity(&navigator, NavigationRequest::OpenNote, "note"),
                CommandType::Notebook => entity(&navigator, NavigationRequest::Notebook, "notebook"),
                CommandType::Tag => entity(&navigator, NavigationRequest::Tag, "tag"),
                CommandType::Reminder => {
                    entity(&navigator, NavigationRequest::EditReminder, "reminder")
                }
            };
            resolvers.insert(kind, resolver);
        }

        Self { resolvers }
    }

    /// Leaves out a type entirely, so its commands have no binding
    pub fn without(mut self, kind: CommandType) -> Self {
        self.resolvers.remove(&kind);
        self
    }

    pub fn icon(&self, command: &Command) -> Option<Icon> {
        self.resolvers.get(&command.kind)?.resolve_icon(&command.id)
    }

    pub fn action(&self, command: &Command) -> Option<Action> {
        self.resolvers.get(&command.kind)?.resolve_action(&command.id)
    }

    /// Invoke the command's action with its id. False when nothing is bound.
    pub fn dispatch(&self, command: &Command) -> bool {
        match self.action(command) {
            Some(action) => {
                action(&command.id);
                true
            }
            None => {
                debug!("No action bound for '{}' ({})", command.id, command.kind);
                false
            }
        }
    }
}

fn entity(
    navigator: &Arc<dyn Navigator>,
    request: fn(String) -> NavigationRequest,
    icon: &str,
) -> Box<dyn ActionResolver> {
    Box::new(EntityResolver {
        navigator: Arc::clone(navigator),
        request,
        icon: Icon::new(icon),
    })
}
