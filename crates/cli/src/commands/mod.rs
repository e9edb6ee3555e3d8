pub(crate) mod health;
pub(crate) mod history;
pub(crate) mod image;
pub(crate) mod predict;

pub(crate) fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
