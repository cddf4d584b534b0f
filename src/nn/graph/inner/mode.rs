//! GraphInner train/eval 模式

use super::GraphInner;

impl GraphInner {
    pub const fn set_train_mode(&mut self) {
        self.is_eval_mode = false;
    }

    pub const fn set_eval_mode(&mut self) {
        self.is_eval_mode = true;
    }

    pub const fn is_train_mode(&self) -> bool {
        !self.is_eval_mode
    }

    /// eval 模式下新建的节点不需要梯度
    pub const fn is_grad_enabled(&self) -> bool {
        self.is_train_mode()
    }
}
