//! Built-in architecture diagrams.
//!
//! Each [`Architecture`] knows its title and how to declare its graph on a
//! [`DiagramScope`]. The CLI renders them by name.

use std::{fmt, str::FromStr};

use archsketch_core::{
    BuildError,
    scope::DiagramScope,
    semantic::{ArrowDirection, Category, DiagramOptions, Direction, Edge, LineStyle},
};

/// Path of the person icon, relative to the icon base directory.
pub const PERSON_ICON: &str = "logo/person.png";

/// The architectures that ship with archsketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    /// Reaching a private EC2 instance through a bastion host.
    BastionHost,
    /// Two VPCs joined by a peering connection.
    VpcPeering,
    /// Two VPCs joined by an IPSec tunnel between a StrongSwan instance and a
    /// virtual private gateway.
    SiteToSiteVpn,
}

impl Architecture {
    pub const ALL: [Architecture; 3] = [Self::BastionHost, Self::VpcPeering, Self::SiteToSiteVpn];

    /// Command-line name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BastionHost => "bastion-host",
            Self::VpcPeering => "vpc-peering",
            Self::SiteToSiteVpn => "site-to-site-vpn",
        }
    }

    /// Diagram title, which also determines the output file name.
    pub fn title(self) -> &'static str {
        match self {
            Self::BastionHost => "Connect to Private EC2 using a Bastion",
            Self::VpcPeering => "VPC Peering",
            Self::SiteToSiteVpn => "Site to Site VPN",
        }
    }

    pub fn options(self) -> DiagramOptions {
        DiagramOptions::new(self.title()).with_direction(Direction::LeftRight)
    }

    /// Declare this architecture's nodes, clusters and edges.
    pub fn declare(self, scope: &mut DiagramScope) -> Result<(), BuildError> {
        match self {
            Self::BastionHost => bastion_host(scope),
            Self::VpcPeering => vpc_peering(scope),
            Self::SiteToSiteVpn => site_to_site_vpn(scope),
        }
    }
}

impl FromStr for Architecture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|architecture| architecture.name() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Self::ALL.iter().map(|a| a.name()).collect();
                format!("unknown architecture `{s}` (expected one of: {})", known.join(", "))
            })
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn bastion_host(scope: &mut DiagramScope) -> Result<(), BuildError> {
    let person = scope.add_custom_node("Person", PERSON_ICON);

    let (igw, bastion, private_ec2) = {
        let mut vpc = scope.open_cluster("VPC");
        let igw = vpc.add_node(Category::InternetGateway, "Internet Gateway");
        let bastion = vpc.cluster("Public Subnet", |subnet| {
            Ok::<_, BuildError>(subnet.add_node(Category::Ec2, "EC2 (Bastion Host)"))
        })?;
        let private_ec2 = vpc.cluster("Private Subnet", |subnet| {
            Ok::<_, BuildError>(subnet.add_node(Category::Ec2, "EC2"))
        })?;
        (igw, bastion, private_ec2)
    };

    scope.connect(person, igw)?;
    scope.connect_with(igw, bastion, Edge::bidirectional())?;
    scope.connect(bastion, private_ec2)?;
    Ok(())
}

fn vpc_peering(scope: &mut DiagramScope) -> Result<(), BuildError> {
    scope.cluster("AWS", |aws| -> Result<(), BuildError> {
        let peering = aws.add_node(Category::VpcPeering, "VPC Peering");
        let person = aws.add_node(Category::User, "Person");

        let (vpc_a, ec2_a) = aws.cluster("VPC A", |vpc| {
            let vpc_a = vpc.add_node(Category::Vpc, "VPC-A");
            let ec2_a = vpc.cluster("Private Subnet A", |subnet| {
                Ok::<_, BuildError>(subnet.add_node(Category::Ec2, "EC2 A"))
            })?;
            Ok::<_, BuildError>((vpc_a, ec2_a))
        })?;

        let vpc_b = aws.cluster("VPC B", |vpc| {
            let vpc_b = vpc.add_node(Category::Vpc, "VPC-B");
            vpc.cluster("Private Subnet B", |subnet| {
                Ok::<_, BuildError>(subnet.add_node(Category::Ec2, "EC2 B"))
            })?;
            Ok::<_, BuildError>(vpc_b)
        })?;

        aws.connect_with(
            vpc_a,
            peering,
            Edge::new().with_direction(ArrowDirection::Backward),
        )?;
        aws.connect(peering, vpc_b)?;
        aws.connect_with(person, ec2_a, Edge::new().with_label("SSM"))?;
        Ok(())
    })
}

fn site_to_site_vpn(scope: &mut DiagramScope) -> Result<(), BuildError> {
    let person = scope.add_node(Category::User, "Person");

    let (strongswan, vgw_a, role_a) = scope.cluster("VPC A (192.168.0.0/26)", |vpc| {
        let vgw_a = vpc.add_node(Category::VpnGateway, "VPN Gateway A");
        let role_a = vpc.add_node(Category::IamRole, "SSM Role A");
        let strongswan = vpc.cluster("Public Subnet A", |subnet| {
            Ok::<_, BuildError>(subnet.add_node(Category::Ec2, "EC2 A (StrongSwan)"))
        })?;
        Ok::<_, BuildError>((strongswan, vgw_a, role_a))
    })?;

    let (ec2_b, vgw_b, role_b) = scope.cluster("VPC B (10.0.0.0/26)", |vpc| {
        let vgw_b = vpc.add_node(Category::VpnGateway, "VPN Gateway B");
        let role_b = vpc.add_node(Category::IamRole, "SSM Role B");
        let ec2_b = vpc.cluster("Private Subnet B", |subnet| {
            Ok::<_, BuildError>(subnet.add_node(Category::Ec2, "EC2 B"))
        })?;
        Ok::<_, BuildError>((ec2_b, vgw_b, role_b))
    })?;

    // The customer gateway advertises EC2 A's public address.
    let customer_gateway = scope.add_node(Category::CustomerGateway, "Customer Gateway");
    let vpn = scope.add_node(Category::VpnConnection, "VPN Connection");

    scope.connect_with(strongswan, vpn, Edge::bidirectional().with_label("IPSec"))?;
    scope.connect(customer_gateway, vpn)?;
    scope.connect(vpn, vgw_b)?;
    scope.connect_with(vgw_b, ec2_b, Edge::new().with_label("192.168.0.0/26"))?;
    scope.connect_with(strongswan, vgw_a, Edge::new().with_label("10.0.0.0/26"))?;

    let attached = Edge::new().with_style(LineStyle::Dashed);
    scope.connect_with(role_a, strongswan, attached.clone())?;
    scope.connect_with(role_b, ec2_b, attached)?;

    scope.connect_with(person, strongswan, Edge::new().with_label("SSM"))?;
    scope.connect_with(person, ec2_b, Edge::new().with_label("SSM"))?;
    Ok(())
}
