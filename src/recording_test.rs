//! Recording [`Surface`] shared by the renderer and mockup tests.

use std::cell::RefCell;

use crate::render::Surface;

/// Stand-in for the base image canvas.
#[derive(Debug, Default)]
pub struct TestImage;

/// Logs every surface call as a short string, e.g. `translate(0, 28)`.
#[derive(Debug, Default)]
pub struct Recorder {
    ops: RefCell<Vec<String>>,
    /// When set, calls whose op name matches return `Err`.
    pub fail_on: Option<&'static str>,
}

impl Recorder {
    pub fn failing(op: &'static str) -> Self {
        Self { fail_on: Some(op), ..Self::default() }
    }

    pub fn ops(&self) -> Vec<String> {
        self.ops.borrow().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.ops.borrow().iter().filter(|op| op.starts_with(prefix)).count()
    }

    pub fn position(&self, op: &str) -> Option<usize> {
        self.ops.borrow().iter().position(|o| o == op)
    }

    pub fn has(&self, op: &str) -> bool {
        self.position(op).is_some()
    }

    fn log(&self, op: String) {
        self.ops.borrow_mut().push(op);
    }

    fn fallible(&self, name: &str, op: String) -> Result<(), String> {
        self.log(op);
        if self.fail_on == Some(name) { Err(format!("{name} failed")) } else { Ok(()) }
    }
}

impl Surface for Recorder {
    type Image = TestImage;
    type Error = String;

    fn save(&self) {
        self.log("save".into());
    }

    fn restore(&self) {
        self.log("restore".into());
    }

    fn reset_transform(&self) -> Result<(), String> {
        self.fallible("reset_transform", "reset_transform".into())
    }

    fn clear(&self, width: f64, height: f64) {
        self.log(format!("clear({width}, {height})"));
    }

    fn translate(&self, x: f64, y: f64) -> Result<(), String> {
        self.fallible("translate", format!("translate({x}, {y})"))
    }

    fn set_fill_color(&self, color: &str) {
        self.log(format!("fill_color({color})"));
    }

    fn set_stroke_color(&self, color: &str) {
        self.log(format!("stroke_color({color})"));
    }

    fn set_line_width(&self, width: f64) {
        self.log(format!("line_width({width})"));
    }

    fn set_line_dash(&self, segments: &[f64]) -> Result<(), String> {
        self.fallible("set_line_dash", format!("line_dash({segments:?})"))
    }

    fn set_round_lines(&self) {
        self.log("round_lines".into());
    }

    fn set_filter(&self, filter: &str) {
        self.log(format!("filter({filter})"));
    }

    fn begin_path(&self) {
        self.log("begin_path".into());
    }

    fn move_to(&self, x: f64, y: f64) {
        self.log(format!("move_to({x}, {y})"));
    }

    fn line_to(&self, x: f64, y: f64) {
        self.log(format!("line_to({x}, {y})"));
    }

    fn arc_to(&self, x1: f64, y1: f64, x2: f64, y2: f64, radius: f64) -> Result<(), String> {
        self.fallible("arc_to", format!("arc_to({x1}, {y1}, {x2}, {y2}, {radius})"))
    }

    fn arc(&self, x: f64, y: f64, radius: f64, _start: f64, _end: f64) -> Result<(), String> {
        self.fallible("arc", format!("arc({x}, {y}, {radius})"))
    }

    fn close_path(&self) {
        self.log("close_path".into());
    }

    fn rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.log(format!("rect({x}, {y}, {width}, {height})"));
    }

    fn fill(&self) {
        self.log("fill".into());
    }

    fn stroke(&self) {
        self.log("stroke".into());
    }

    fn clip(&self) {
        self.log("clip".into());
    }

    fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.log(format!("fill_rect({x}, {y}, {width}, {height})"));
    }

    fn stroke_rect(&self, x: f64, y: f64, width: f64, height: f64) {
        self.log(format!("stroke_rect({x}, {y}, {width}, {height})"));
    }

    fn set_font(&self, font: &str) {
        self.log(format!("font({font})"));
    }

    fn set_text_align(&self, align: &str) {
        self.log(format!("text_align({align})"));
    }

    fn set_text_baseline(&self, baseline: &str) {
        self.log(format!("text_baseline({baseline})"));
    }

    fn fill_text(&self, text: &str, x: f64, y: f64) -> Result<(), String> {
        self.fallible("fill_text", format!("fill_text({text}, {x}, {y})"))
    }

    fn draw_image(&self, _image: &TestImage, x: f64, y: f64) -> Result<(), String> {
        self.fallible("draw_image", format!("draw_image({x}, {y})"))
    }
}
