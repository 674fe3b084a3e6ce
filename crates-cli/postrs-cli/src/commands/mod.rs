pub mod list;
pub mod send;

pub(crate) type CommandResult<T = ()> = std::result::Result<T, String>;

pub(crate) fn exit_code(result: CommandResult) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            crate::ui::error(&error);
            1
        }
    }
}
