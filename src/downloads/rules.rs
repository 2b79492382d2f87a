use crate::core::config::PageConfig;

/// File classification rules: platform tags and recognized suffixes
///
/// Both lists are ordered; their order is the page's display order.
#[derive(Debug, Clone, Copy)]
pub struct FileRules<'a> {
  pub platforms: &'a [String],
  pub suffixes: &'a [String],
}

impl<'a> FileRules<'a> {
  pub fn from_config(config: &'a PageConfig) -> Self {
    Self {
      platforms: &config.platforms,
      suffixes: &config.suffixes,
    }
  }

  /// Position of the first suffix the name ends with
  pub fn suffix_index(&self, name: &str) -> Option<usize> {
    self.suffixes.iter().position(|s| name.ends_with(s.as_str()))
  }

  pub fn is_download(&self, name: &str) -> bool {
    self.suffix_index(name).is_some()
  }

  /// First platform tag contained in the name
  pub fn platform_of(&self, name: &str) -> Option<&'a str> {
    self
      .platforms
      .iter()
      .find(|p| name.contains(p.as_str()))
      .map(String::as_str)
  }

  /// Composite ordering key
  ///
  /// Platform-tagged files order by platform priority. Untagged files follow
  /// all tagged ones, ordered by suffix priority.
  pub fn order_key(&self, name: &str, platform: Option<&str>) -> usize {
    let tagged = platform.and_then(|p| self.platforms.iter().position(|x| p.contains(x.as_str())));
    match tagged {
      Some(idx) => idx,
      None => self.platforms.len() + self.suffix_index(name).unwrap_or(self.suffixes.len()),
    }
  }
}
