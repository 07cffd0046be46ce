use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<InputAction>()
            .init_resource::<PlayerInput>()
            .init_resource::<InputContext>()
            .add_systems(
                PreUpdate,
                (manage_input_context, reset_and_read_input).chain(),
            );
    }
}

/// The single point where logical actions become this frame's input.
fn reset_and_read_input(
    context: Res<InputContext>,
    mut actions: EventReader<InputAction>,
    mut input: ResMut<PlayerInput>,
) {
    let pointer = input.pointer;
    *input = PlayerInput {
        pointer,
        ..PlayerInput::default()
    };

    for action in actions.read() {
        fold_action(&mut input, *context, *action);
    }
}

/// Applies one action to the frame snapshot, dropping whatever the
/// current context does not accept.
pub fn fold_action(input: &mut PlayerInput, context: InputContext, action: InputAction) {
    use InputAction as A;

    // The pointer is tracked everywhere so aiming is correct on return.
    if let A::Pointer(tile) = action {
        input.pointer = tile;
        return;
    }

    match context {
        InputContext::Gameplay => match action {
            A::Move(axis) => input.move_axis += axis,
            A::SelectSlot(slot) => input.select_slot = Some(slot),
            A::CycleSlot(step) => input.cycle_slot = input.cycle_slot.saturating_add(step),
            A::UseSelected => input.use_selected = true,
            A::Interact => input.interact = true,
            A::OpenCrafting => input.open_crafting = true,
            A::ToggleAim => input.toggle_aim = true,
            A::Save => input.quicksave = true,
            A::Load => input.quickload = true,
            A::Pause => input.pause = true,
            _ => {}
        },

        InputContext::Menu => match action {
            A::NavLeft => input.ui_left = true,
            A::NavRight => input.ui_right = true,
            A::Confirm => input.ui_confirm = true,
            A::Cancel => input.ui_cancel = true,
            // Interact doubles as "close".
            A::Interact => input.interact = true,
            A::Pause => input.pause = true,
            A::Save => input.quicksave = true,
            A::Load => input.quickload = true,
            _ => {}
        },

        InputContext::Fishing => match action {
            A::UseSelected | A::Confirm => input.use_selected = true,
            A::Cancel => input.ui_cancel = true,
            _ => {}
        },
    }
}

/// Derives InputContext from GameState. One system replaces per-domain guards.
fn manage_input_context(
    game_state: Res<State<GameState>>,
    mut context: ResMut<InputContext>,
) {
    *context = match *game_state.get() {
        GameState::Playing => InputContext::Gameplay,
        GameState::Fishing => InputContext::Fishing,
        GameState::Paused
        | GameState::Dialogue
        | GameState::Shop
        | GameState::Shipping
        | GameState::Crafting => InputContext::Menu,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gameplay_ignores_menu_navigation() {
        let mut input = PlayerInput::default();
        fold_action(&mut input, InputContext::Gameplay, InputAction::NavLeft);
        fold_action(&mut input, InputContext::Gameplay, InputAction::UseSelected);
        assert!(!input.ui_left);
        assert!(input.use_selected);
    }

    #[test]
    fn test_menu_ignores_movement() {
        let mut input = PlayerInput::default();
        fold_action(&mut input, InputContext::Menu, InputAction::Move(Vec2::X));
        fold_action(&mut input, InputContext::Menu, InputAction::Confirm);
        assert_eq!(input.move_axis, Vec2::ZERO);
        assert!(input.ui_confirm);
    }

    #[test]
    fn test_pointer_tracked_in_every_context() {
        let mut input = PlayerInput::default();
        let tile = Some(TileCoord::new(4, 4));
        fold_action(&mut input, InputContext::Fishing, InputAction::Pointer(tile));
        assert_eq!(input.pointer, tile);
    }

    #[test]
    fn test_fishing_accepts_catch_and_cancel_only() {
        let mut input = PlayerInput::default();
        fold_action(&mut input, InputContext::Fishing, InputAction::Interact);
        assert!(!input.interact);
        fold_action(&mut input, InputContext::Fishing, InputAction::Confirm);
        fold_action(&mut input, InputContext::Fishing, InputAction::Cancel);
        assert!(input.use_selected);
        assert!(input.ui_cancel);
    }

    #[test]
    fn test_moves_in_one_frame_accumulate() {
        let mut input = PlayerInput::default();
        fold_action(&mut input, InputContext::Gameplay, InputAction::Move(Vec2::X));
        fold_action(&mut input, InputContext::Gameplay, InputAction::Move(Vec2::Y));
        assert_eq!(input.move_axis, Vec2::new(1.0, 1.0));
    }
}
