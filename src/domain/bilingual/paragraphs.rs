//! 段落列表抽象
//!
//! 合并引擎只依赖这组操作，不关心底层文档用什么方式解析和序列化。

/// 参与合并的原文段落列表
///
/// 索引始终指向原文段落，插入新段落不会改变原文段落的索引。
pub trait ParagraphList {
    /// 原文段落数（不含空白段落）
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 在原文段落之前插入新段落，紧贴原文段落
    fn insert_before(&mut self, index: usize, text: &str);

    /// 在原文段落之后插入新段落，紧贴原文段落
    fn insert_after(&mut self, index: usize, text: &str);

    /// 移除原文段落，已插入的新段落保留
    fn remove(&mut self, index: usize);

    /// 设置原文段落的属性，已存在则替换
    fn set_attribute(&mut self, index: usize, name: &str, value: &str);
}
