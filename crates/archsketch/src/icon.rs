//! Icon resolution.
//!
//! Maps a node [`Category`] to something Graphviz can draw: either an image
//! file or, when no icon set is installed, a plain shape.

use std::path::{Path, PathBuf};

use log::trace;

use archsketch_core::semantic::Category;

use crate::{config::IconConfig, export::Error};

/// What a node is drawn with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconAsset {
    /// An image file on disk.
    Image(PathBuf),
    /// A Graphviz node shape.
    Shape(&'static str),
}

/// Resolves categories to icon assets.
#[derive(Debug, Clone)]
pub struct IconResolver {
    icons_dir: Option<PathBuf>,
    base_dir: PathBuf,
}

impl IconResolver {
    /// Create a resolver.
    ///
    /// # Arguments
    ///
    /// * `icons_dir` - Root of the built-in icon set, if installed.
    /// * `base_dir` - Directory that custom icon paths are relative to.
    pub fn new(icons_dir: Option<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            icons_dir,
            base_dir: base_dir.into(),
        }
    }

    /// Create a resolver from the `[icons]` configuration section.
    pub fn from_config(config: &IconConfig) -> Self {
        Self::new(
            config.directory().map(Path::to_path_buf),
            config.base_directory(),
        )
    }

    /// Resolve `category` to an asset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Asset`] if the category names an image file that does
    /// not exist.
    pub fn resolve(&self, category: &Category) -> Result<IconAsset, Error> {
        let candidate = match (category, &self.icons_dir) {
            (Category::Custom(path), _) => self.base_dir.join(path),
            (_, Some(icons_dir)) => icons_dir.join(asset_path(category)),
            (_, None) => return Ok(IconAsset::Shape(fallback_shape(category))),
        };

        let path = candidate.canonicalize().map_err(|_| Error::Asset {
            category: category.to_string(),
            path: candidate.clone(),
        })?;
        trace!(category:% = category, path = path.display().to_string(); "Resolved icon");
        Ok(IconAsset::Image(path))
    }
}

impl Default for IconResolver {
    fn default() -> Self {
        Self::new(None, ".")
    }
}

/// Relative path of a built-in category inside the icon set.
///
/// Custom categories carry their own path and map to an empty string.
pub fn asset_path(category: &Category) -> &'static str {
    match category {
        Category::Ec2 => "aws/compute/ec2.png",
        Category::InternetGateway => "aws/network/internet-gateway.png",
        Category::Vpc => "aws/network/vpc.png",
        Category::VpcPeering => "aws/network/vpc-peering.png",
        Category::PrivateSubnet => "aws/network/private-subnet.png",
        Category::PublicSubnet => "aws/network/public-subnet.png",
        Category::RouteTable => "aws/network/route-table.png",
        Category::Endpoint => "aws/network/endpoint.png",
        Category::VpnGateway => "aws/network/vpn-gateway.png",
        Category::CustomerGateway => "aws/network/customer-gateway.png",
        Category::VpnConnection => "aws/network/site-to-site-vpn.png",
        Category::SystemsManagerParameterStore => {
            "aws/management/systems-manager-parameter-store.png"
        }
        Category::IamRole => "aws/security/identity-and-access-management-iam-role.png",
        Category::User => "aws/general/user.png",
        Category::Terraform => "onprem/iac/terraform.png",
        Category::Custom(_) => "",
    }
}

/// Shape used for a category when no icon set is available.
pub fn fallback_shape(category: &Category) -> &'static str {
    match category {
        Category::Ec2 => "box3d",
        Category::InternetGateway
        | Category::VpnGateway
        | Category::CustomerGateway
        | Category::Endpoint => "doublecircle",
        Category::Vpc | Category::VpcPeering | Category::VpnConnection => "hexagon",
        Category::PrivateSubnet | Category::PublicSubnet | Category::RouteTable => "tab",
        Category::SystemsManagerParameterStore => "cylinder",
        Category::IamRole => "note",
        Category::User | Category::Custom(_) => "circle",
        Category::Terraform => "component",
    }
}
