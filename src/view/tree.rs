use super::{Behavior, Element, ElementContext, ElementId, Gui};
use crate::error::{Result, UiError};
use crate::style::Descriptor;

/// Upper bound on state-change notifications drained in one flush. Hooks that
/// keep flipping each other's state are cut off here.
const MAX_STATE_CASCADE: usize = 4096;

impl Gui {
    /// Creates a detached element. Attach it with [`Gui::add_child`].
    pub fn create_element(&mut self, layout: Descriptor) -> ElementId {
        self.nodes.insert(Element::new(layout))
    }

    pub fn create_with_behavior(
        &mut self,
        layout: Descriptor,
        behavior: impl Behavior + 'static,
    ) -> ElementId {
        let id = self.create_element(layout);
        self.set_behavior(id, behavior);
        id
    }

    /// Installs `behavior`, adopting its focusable and focus-override flags.
    pub fn set_behavior(&mut self, id: ElementId, behavior: impl Behavior + 'static) {
        let focusable = behavior.focusable();
        let override_focus_change = behavior.override_focus_change();
        let Some(element) = self.nodes.get_mut(id) else {
            tracing::warn!(?id, "behavior for a missing element");
            return;
        };
        element.behavior = Some(Box::new(behavior));
        element.override_focus_change = override_focus_change;
        self.set_focusable(id, focusable);
    }

    pub fn add_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        if !self.nodes.contains_key(parent) {
            return Err(UiError::UnknownElement(parent));
        }
        let Some(node) = self.nodes.get(child) else {
            return Err(UiError::UnknownElement(child));
        };
        if node.is_root {
            return Err(UiError::RootAsChild);
        }
        if node.parent.is_some() {
            return Err(UiError::AlreadyAttached(child));
        }
        if parent == child || self.ancestors(parent).contains(&child) {
            return Err(UiError::WouldCycle);
        }

        let focusable_in_tree = node.focusable_in_tree;
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.push(child);
        }
        self.adjust_focusable_count(parent, focusable_in_tree as isize);
        tracing::debug!(?parent, ?child, "attach");
        Ok(())
    }

    /// Detaches `child` and disposes its whole subtree. Every disposed element
    /// gets `on_dispose` (children first) before any of them is freed.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        let Some(node) = self.nodes.get(child) else {
            return Err(UiError::UnknownElement(child));
        };
        if node.parent != Some(parent) {
            return Err(UiError::UnknownElement(child));
        }

        let focusable_in_tree = node.focusable_in_tree;
        self.adjust_focusable_count(parent, -(focusable_in_tree as isize));
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&id| id != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }

        let mut disposed = Vec::new();
        self.collect_post_order(child, &mut disposed);
        for &id in &disposed {
            self.with_behavior(id, (), |behavior, cx| behavior.on_dispose(cx));
        }
        if self.focused.is_some_and(|focused| disposed.contains(&focused)) {
            self.focused = None;
        }
        self.pending_state_changes.retain(|id| !disposed.contains(id));
        for id in &disposed {
            self.nodes.remove(*id);
        }
        tracing::debug!(?parent, ?child, removed = disposed.len(), "detach");
        Ok(())
    }

    /// Removes `id` from its parent, disposing its subtree.
    pub fn remove(&mut self, id: ElementId) -> Result<()> {
        let parent = self
            .nodes
            .get(id)
            .ok_or(UiError::UnknownElement(id))?
            .parent
            .ok_or(UiError::UnknownElement(id))?;
        self.remove_child(parent, id)
    }

    pub fn set_focusable(&mut self, id: ElementId, focusable: bool) {
        let Some(element) = self.nodes.get_mut(id) else {
            return;
        };
        if element.focusable == focusable {
            return;
        }
        element.focusable = focusable;
        self.adjust_focusable_count(id, if focusable { 1 } else { -1 });
    }

    pub fn set_override_focus_change(&mut self, id: ElementId, enabled: bool) {
        if let Some(element) = self.nodes.get_mut(id) {
            element.override_focus_change = enabled;
        }
    }

    /// Visits `id` and its descendants in document order.
    pub fn for_each(&self, id: ElementId, mut visit: impl FnMut(ElementId, &Element)) {
        let mut order = Vec::new();
        self.collect_pre_order(id, &mut order);
        for id in order {
            if let Some(element) = self.nodes.get(id) {
                visit(id, element);
            }
        }
    }

    pub fn count_if(&self, id: ElementId, mut predicate: impl FnMut(&Element) -> bool) -> usize {
        let mut count = 0;
        self.for_each(id, |_, element| {
            if predicate(element) {
                count += 1;
            }
        });
        count
    }

    /// Parent first, root last.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let mut chain = Vec::new();
        let mut cursor = self.nodes.get(id).and_then(|element| element.parent);
        while let Some(ancestor) = cursor {
            chain.push(ancestor);
            cursor = self.nodes.get(ancestor).and_then(|element| element.parent);
        }
        chain
    }

    pub(crate) fn collect_pre_order(&self, id: ElementId, out: &mut Vec<ElementId>) {
        let Some(element) = self.nodes.get(id) else {
            return;
        };
        out.push(id);
        for &child in &element.children {
            self.collect_pre_order(child, out);
        }
    }

    pub(crate) fn collect_post_order(&self, id: ElementId, out: &mut Vec<ElementId>) {
        let Some(element) = self.nodes.get(id) else {
            return;
        };
        for &child in &element.children {
            self.collect_post_order(child, out);
        }
        out.push(id);
    }

    fn adjust_focusable_count(&mut self, from: ElementId, delta: isize) {
        if delta == 0 {
            return;
        }
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let Some(element) = self.nodes.get_mut(id) else {
                break;
            };
            element.focusable_in_tree = element.focusable_in_tree.saturating_add_signed(delta);
            cursor = element.parent;
        }
    }

    /// Runs `f` with the element's behavior taken out of the tree, so the hook
    /// may freely mutate the [`Gui`]. Returns `default` when the element has
    /// no behavior.
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: ElementId,
        default: R,
        f: impl FnOnce(&mut dyn Behavior, &mut ElementContext<'_>) -> R,
    ) -> R {
        let Some(mut behavior) = self
            .nodes
            .get_mut(id)
            .and_then(|element| element.behavior.take())
        else {
            return default;
        };

        self.hook_depth += 1;
        let result = {
            let mut cx = ElementContext { gui: self, id };
            f(behavior.as_mut(), &mut cx)
        };
        self.hook_depth -= 1;

        if let Some(element) = self.nodes.get_mut(id) {
            element.behavior = Some(behavior);
        }
        self.flush_state_changes();
        result
    }

    /// Delivers queued `on_state_change` notifications once no hook is running.
    pub(crate) fn flush_state_changes(&mut self) {
        if self.hook_depth > 0 || self.flushing {
            return;
        }
        self.flushing = true;
        let mut delivered = 0;
        while let Some(id) = self.pending_state_changes.pop_front() {
            if delivered == MAX_STATE_CASCADE {
                tracing::warn!(
                    dropped = self.pending_state_changes.len() + 1,
                    "state change cascade cut off"
                );
                self.pending_state_changes.clear();
                break;
            }
            delivered += 1;
            self.with_behavior(id, (), |behavior, cx| behavior.on_state_change(cx));
        }
        self.flushing = false;
    }
}
