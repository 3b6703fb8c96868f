//! Traits shared by catalog entries and plan days.

use uuid::Uuid;

/// Entities addressed by a stable id that survives renames and window moves.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Short label used in log fields.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// First entry of `items` whose id is `id`.
pub fn find_by_id<T: Identifiable>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

/// First entry of `items` whose trimmed name equals the trimmed `name`.
pub fn find_by_name<'a, T: NamedEntity>(items: &'a [T], name: &str) -> Option<&'a T> {
    let name = name.trim();
    items.iter().find(|item| item.name().trim() == name)
}
